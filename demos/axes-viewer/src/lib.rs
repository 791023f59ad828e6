use wasm_bindgen::prelude::*;
use starfall_engine::*;

mod game;
use game::AxesViewer;

starfall_web::export_scene!(AxesViewer, "axes-viewer");
