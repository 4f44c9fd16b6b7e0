use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(env: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Default log levels based on environment
        match env {
            Environment::Dev => "profile_editor=debug,info".into(),
            Environment::Staging => "profile_editor=debug,info".into(),
            Environment::Prod => "profile_editor=info,warn".into(),
        }
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // Use JSON format in production, pretty format in dev. try_init: the
    // embedding application (or a test harness) may have installed a
    // subscriber already, and that one wins.
    let installed = if matches!(env, Environment::Prod) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .try_init()
    };

    if installed.is_ok() {
        tracing::info!("Logging initialized for {:?} environment", env);
    }
}
