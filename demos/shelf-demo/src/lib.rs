use wasm_bindgen::prelude::*;

mod shelf;
use shelf::ShelfTheme;

marquee_web::export_theme!(ShelfTheme, "shelf-demo", ShelfTheme::load());
