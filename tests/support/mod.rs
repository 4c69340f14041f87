pub mod clipclock_env;
