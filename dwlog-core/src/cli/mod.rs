pub mod conf;
pub mod scan;

#[cfg(test)]
mod tests;
