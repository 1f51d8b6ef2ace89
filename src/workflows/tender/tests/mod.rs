mod common;
mod extraction;
mod provider;
