fn main() -> std::process::ExitCode {
    keymorph::run()
}
