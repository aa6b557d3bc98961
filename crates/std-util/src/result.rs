/// Unwraps the `Err` variant of a result, panicking with the `Ok` value
/// otherwise. When a second argument is given, the error's `Display` output
/// must contain it.
#[macro_export]
macro_rules! assert_err {
    ($e:expr) => {
        match $e {
            Err(e) => e,
            Ok(actual) => panic!("expected `Err`; actual=Ok({:?})", actual),
        }
    };
    ($e:expr, $needle:expr) => {{
        let err = $crate::assert_err!($e);
        let msg = err.to_string();
        assert!(
            msg.contains($needle),
            "error message does not contain {:?}; message={:?}",
            $needle,
            msg
        );
        err
    }};
}

/// Unwraps the `Ok` variant of a result, panicking with the error's
/// `Display` output otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(err) => panic!("expected `Ok`; actual=Err({})", err),
        }
    };
}
