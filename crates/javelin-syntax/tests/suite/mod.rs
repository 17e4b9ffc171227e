mod json;
mod walking;
