//! Result type alias for medrecords

use super::errors::RecordsError;

/// Result type alias for medrecords operations
///
/// # Examples
///
/// ```
/// use medrecords::domain::result::Result;
/// use medrecords::domain::errors::RecordsError;
///
/// fn lookup(found: bool) -> Result<u32> {
///     if found {
///         Ok(7)
///     } else {
///         Err(RecordsError::NotFound("7".to_string()))
///     }
/// }
///
/// assert!(lookup(true).is_ok());
/// assert!(lookup(false).is_err());
/// ```
pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i64> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
