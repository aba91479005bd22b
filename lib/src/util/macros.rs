#[doc(hidden)]
#[macro_export]
macro_rules! time {
    ($label:expr => $($token:tt)*) => ({
        let start = std::time::Instant::now();
        let value = { $($token)* };
        println!("{}: {}ms", $label, start.elapsed().as_millis());

        value
    });
}

pub use time;
