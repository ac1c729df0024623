fn main() {
    #[cfg(feature = "logging")]
    env_logger::init();

    staghorn::uci::run_uci_loop();
}
