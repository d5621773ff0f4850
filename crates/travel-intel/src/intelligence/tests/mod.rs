mod common;
mod policy;
