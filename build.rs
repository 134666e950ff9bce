fn main() {
    // Credentials are baked in with option_env!; rebuild when they change.
    for var in [
        "EDUROAM_SSID",
        "EDUROAM_IDENTITY",
        "EDUROAM_USERNAME",
        "EDUROAM_PASSWORD",
    ] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    #[cfg(feature = "espidf")]
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
