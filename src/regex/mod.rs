// Compiled regular expressions, cached for the lifetime of the program

#[macro_use]
mod cache;
