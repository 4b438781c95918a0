//! Cross-component scenarios driven through `ScannerSession`.

mod flows;
mod lifecycle;
mod restore;

#[cfg(test)]
mod fixtures;
