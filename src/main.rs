use chem_balancer::cli::cli_main::run;

pub fn main() {
    std::process::exit(run());
}
