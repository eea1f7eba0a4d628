pub mod icons;
pub mod layout_customization;
pub mod navigation;
pub mod page_frame;
