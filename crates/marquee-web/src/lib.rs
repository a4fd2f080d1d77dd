pub mod runner;

pub use runner::Director;

// Used by the code `export_theme!` expands to.
pub use console_error_panic_hook;
pub use console_log;
pub use log;
pub use marquee_engine;

/// Generate all `#[wasm_bindgen]` exports for a theme.
///
/// Generates:
/// - `thread_local!` storage for the Director
/// - `with_director()` helper function
/// - All wasm-bindgen exports (frontend_init, frontend_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod theme;
/// use theme::ShelfTheme;
///
/// // `ShelfTheme::new()` returns the theme directly:
/// marquee_web::export_theme!(ShelfTheme, "shelf");
/// // or build it with an expression returning `Result<Theme, impl Display>`:
/// marquee_web::export_theme!(LayoutTheme, "shelf", theme::build());
/// ```
///
/// If construction fails the error is logged and every other export panics
/// with "Director not initialized".
#[macro_export]
macro_rules! export_theme {
    ($theme_type:ty, $theme_name:literal) => {
        $crate::export_theme!(
            $theme_type,
            $theme_name,
            Ok::<$theme_type, String>(<$theme_type>::new())
        );
    };

    ($theme_type:ty, $theme_name:literal, $make:expr) => {
        use std::cell::RefCell;
        use $crate::marquee_engine::InputEvent;

        thread_local! {
            static DIRECTOR: RefCell<Option<$crate::Director<$theme_type>>> = RefCell::new(None);
        }

        fn with_director<R>(f: impl FnOnce(&mut $crate::Director<$theme_type>) -> R) -> R {
            DIRECTOR.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let director = borrow.as_mut().expect("Director not initialized. Call frontend_init() first.");
                f(director)
            })
        }

        #[wasm_bindgen]
        pub fn frontend_init() {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level($crate::log::Level::Info);

            let theme: $theme_type = match $make {
                Ok(theme) => theme,
                Err(err) => {
                    $crate::log::error!("{}: theme failed to load: {}", $theme_name, err);
                    return;
                }
            };
            let director = $crate::Director::new(theme);

            DIRECTOR.with(|cell| {
                *cell.borrow_mut() = Some(director);
            });

            with_director(|d| d.init());
            $crate::log::info!("{}: initialized", $theme_name);
        }

        #[wasm_bindgen]
        pub fn frontend_tick(dt: f32) {
            with_director(|d| d.tick(dt));
        }

        #[wasm_bindgen]
        pub fn frontend_key_down(key_code: u32) {
            with_director(|d| d.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn frontend_key_up(key_code: u32) {
            with_director(|d| d.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn frontend_button_down(button: u32) {
            with_director(|d| d.push_input(InputEvent::ButtonDown { button }));
        }

        #[wasm_bindgen]
        pub fn frontend_button_up(button: u32) {
            with_director(|d| d.push_input(InputEvent::ButtonUp { button }));
        }

        #[wasm_bindgen]
        pub fn frontend_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_director(|d| d.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn frontend_load_manifest(json: &str) {
            with_director(|d| d.load_manifest(json));
        }

        #[wasm_bindgen]
        pub fn frontend_load_controls(json: &str) {
            with_director(|d| d.load_controls(json));
        }

        #[wasm_bindgen]
        pub fn frontend_resize(width: f32, height: f32) {
            with_director(|d| d.resize(width, height));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_director(|d| d.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_director(|d| d.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_dropped_instances() -> u32 {
            with_director(|d| d.dropped_instances())
        }

        #[wasm_bindgen]
        pub fn get_texts_json() -> String {
            with_director(|d| d.texts_json())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const f32 {
            with_director(|d| d.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_director(|d| d.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_stage_events_ptr() -> *const f32 {
            with_director(|d| d.stage_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_stage_events_len() -> u32 {
            with_director(|d| d.stage_events_len())
        }

        #[wasm_bindgen]
        pub fn get_window_width() -> f32 {
            with_director(|d| d.window_width())
        }

        #[wasm_bindgen]
        pub fn get_window_height() -> f32 {
            with_director(|d| d.window_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_director(|d| d.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_director(|d| d.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_director(|d| d.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_director(|d| d.buffer_total_floats())
        }
    };
}
