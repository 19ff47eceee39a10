pub use crate::model::ShapeModel;
