//! Binary entrypoint for fontprofile-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = fontprofile_cli::run() {
        match err.downcast_ref::<clap::Error>() {
            Some(clap_err) => {
                let _ = clap_err.print();
            }
            None => eprintln!("error: {err}"),
        }
        std::process::exit(fontprofile_cli::exit_code(&err));
    }
}
