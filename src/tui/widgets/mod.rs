//! Overlay widgets

pub mod add_form;
