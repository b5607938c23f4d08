pub mod completion;
pub mod hover;
pub mod navigation;

#[cfg(test)]
pub(crate) mod test_support;
