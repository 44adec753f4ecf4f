/// Command line front end: equations from arguments or a file, exit codes 0/1/3
pub mod cli_main;
