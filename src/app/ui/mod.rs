mod controls;
mod details;
mod images;
mod panels;
