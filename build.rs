fn main() {
    // The ESP-IDF environment is only needed for the device binary; host
    // builds (library + tests) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
