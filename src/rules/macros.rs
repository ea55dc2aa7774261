#[macro_export]
macro_rules! emit {
    ($report:expr, $line:expr, $column:expr, $($msg:tt)+) => {
        $report.push($line, $column, format!($($msg)+))
    };
}
