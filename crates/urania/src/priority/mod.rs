pub mod engine;

pub use engine::{
    aspect_weight, select_aspects, select_bodies, select_for_display, select_houses,
    select_transits, transit_weight, Selection,
};
