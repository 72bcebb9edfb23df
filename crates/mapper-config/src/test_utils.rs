/// Runs `f` with the given variables set (`Some`) or removed (`None`),
/// restoring the previous environment afterwards.
pub fn with_env<F>(vars: &[(&str, Option<&str>)], f: F)
where
    F: FnOnce(),
{
    let saved: Vec<(&str, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (*key, std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        apply(key, *value);
    }

    f();

    for (key, value) in &saved {
        apply(key, value.as_deref());
    }
}

fn apply(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}
