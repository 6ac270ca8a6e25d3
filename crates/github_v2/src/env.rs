//! Environment variable helpers backed by [dotenvy].

use anyhow::Context;
use std::error::Error;
use std::str::FromStr;

/// Reads an environment variable for the current process, loading the `.env`
/// file from the current or parent directories first. Returns `Ok(None)` if
/// the variable is not set.
#[track_caller]
pub fn var(key: &str) -> anyhow::Result<Option<String>> {
    match dotenvy::var(key) {
        Ok(content) => Ok(Some(content)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Like [var], but parses the value with [FromStr] when it is set.
#[track_caller]
pub fn var_parsed<R>(key: &str) -> anyhow::Result<Option<R>>
where
    R: FromStr,
    R::Err: Error + Send + Sync + 'static,
{
    match var(key) {
        Ok(Some(content)) => {
            Ok(Some(content.parse().with_context(|| {
                format!("Failed to parse {key} environment variable")
            })?))
        }
        Ok(None) => Ok(None),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_none, assert_ok, assert_some_eq};
    use std::sync::{LazyLock, Mutex};

    const TEST_VAR: &str = "GITHUB_V2_TEST_VAR";

    /// A mutex to ensure that the tests don't run in parallel, since they
    /// all modify the shared environment variable.
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

    #[test]
    fn test_var() {
        let _guard = MUTEX.lock().unwrap();

        unsafe { std::env::set_var(TEST_VAR, "test") };
        assert_some_eq!(assert_ok!(var(TEST_VAR)), "test");

        unsafe { std::env::remove_var(TEST_VAR) };
        assert_none!(assert_ok!(var(TEST_VAR)));
    }

    #[test]
    fn test_var_parsed() {
        let _guard = MUTEX.lock().unwrap();

        unsafe { std::env::set_var(TEST_VAR, "42") };
        assert_some_eq!(assert_ok!(var_parsed::<i32>(TEST_VAR)), 42);

        unsafe { std::env::set_var(TEST_VAR, "test") };
        assert_err!(var_parsed::<i32>(TEST_VAR));

        unsafe { std::env::remove_var(TEST_VAR) };
        assert_none!(assert_ok!(var_parsed::<i32>(TEST_VAR)));
    }
}
