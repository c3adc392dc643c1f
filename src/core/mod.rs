pub mod dictionary;
pub mod editor;
pub mod keymap;
pub mod keypad;
pub mod ranking;
pub mod types;
