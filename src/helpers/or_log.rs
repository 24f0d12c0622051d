/// Used to log an error and carry on without the value
pub trait OrLog<T> {
    fn or_log(self, level: log::Level, context: &str) -> Option<T>;

    fn or_log_warn(self, context: &str) -> Option<T>
    where
        Self: Sized,
    {
        self.or_log(log::Level::Warn, context)
    }

    fn or_log_error(self, context: &str) -> Option<T>
    where
        Self: Sized,
    {
        self.or_log(log::Level::Error, context)
    }
}

impl<T, E> OrLog<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn or_log(self, level: log::Level, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                log!(level, "{}: {}", context, e);
                None
            }
        }
    }
}
