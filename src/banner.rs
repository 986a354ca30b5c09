//! Console easter egg printed once the page is wired up.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

const BANNER: &str = r#"
    ╔══════════════════════════════════════════════════════════════════════════════╗
    ║                                  Wiss Dev                                    ║
    ║                          Welcome to Night City, 2077                         ║
    ║                                                                              ║
    ║                    ██████╗ ██╗   ██╗██████╗ ███████╗                         ║
    ║                   ██╔════╝ ██║   ██║██╔══██╗██╔════╝                         ║
    ║                   ██║      ██║   ██║██████╔╝█████╗                           ║
    ║                   ██║      ██║   ██║██╔══██╗██╔══╝                           ║
    ║                   ╚██████╔ ╚██████╔╝██║  ██║███████╗                         ║
    ║                    ╚═════╝  ╚═════╝ ╚═╝  ╚═╝╚══════╝                         ║
    ║                                                                              ║
    ║               Game Dev | Unity Intermediate |  Studio Expert                 ║
    ║                                                                              ║
    ╚══════════════════════════════════════════════════════════════════════════════╝
"#;

/// Styled greeting lines printed under the banner: (text, css).
pub const GREETINGS: &[(&str, &str)] = &[
    (
        "Welcome to the CyberDev Portfolio!",
        "color: #F8E602; font-size: 16px; font-weight: bold;",
    ),
    (
        "Feel free to explore the code and see how this cyberpunk experience was crafted.",
        "color: #00F0FF; font-size: 14px;",
    ),
    (
        "Interested in collaboration? Check out the contact section!",
        "color: #772289; font-size: 14px;",
    ),
];

/// Console easter egg.
pub fn print_banner() {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::log_1(&JsValue::from_str(BANNER));
        for (text, css) in GREETINGS {
            web_sys::console::log_2(
                &JsValue::from_str(&format!("%c{text}")),
                &JsValue::from_str(css),
            );
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!(target: "banner", "{BANNER}");
        for (text, _) in GREETINGS {
            log::info!(target: "banner", "{text}");
        }
    }
}
