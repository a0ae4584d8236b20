mod checks;
mod samples;
