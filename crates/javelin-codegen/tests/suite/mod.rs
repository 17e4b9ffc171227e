mod classes;
mod enums;
mod support;
mod switches;
