mod common;
mod resume;
