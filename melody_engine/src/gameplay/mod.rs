pub mod judge;
pub mod note;
pub mod score;
pub mod spawner;
pub mod words;
