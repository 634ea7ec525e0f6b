#[cfg(test)]
#[path = "context_window_test.rs"]
mod tests;

/// The last `size` entries of `log`, oldest first. Anything older is dropped.
pub fn window<T>(log: &[T], size: usize) -> &[T] {
    return &log[log.len().saturating_sub(size)..];
}
