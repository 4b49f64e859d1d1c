//! Output macros for operator-facing lines.
//!
//! Results go to stdout; progress, hints and errors go to stderr so that
//! `--json` output stays machine readable.

#[macro_export]
macro_rules! bench_println {
    () => {
        println!();
    };
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! bench_error {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! bench_error_hint {
    ($($arg:tt)*) => {
        eprintln!("💡 {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! bench_warning {
    ($($arg:tt)*) => {
        eprintln!("⚠ {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! bench_progress {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    };
}
