fn main() {
    briscola_mc::cli::run();
}
