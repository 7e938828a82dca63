mod placement;

pub use placement::{
    label_offset, label_text, place_label, place_labels, Connector, LabelPlacement, TextAlign, LABEL_INSET,
};
