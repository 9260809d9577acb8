pub mod form;
pub mod matrix;
pub mod modal;
pub mod particles;
pub mod tween;
