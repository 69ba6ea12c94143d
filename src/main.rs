use vorth::interp::Interp;

use getopts::Options;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options::new();
    opts.optopt("s", "", "set script file name", "NAME");
    opts.optflag("q", "", "quit after running the script");
    let matches = opts.parse(&args[1..]).unwrap();

    let mut xs = Interp::boot();
    if let Some(filename) = matches.opt_str("s") {
        match std::fs::read_to_string(&filename) {
            Ok(buf) => {
                for line in buf.lines() {
                    if xs.eval(line).is_err() {
                        break;
                    }
                    println!("stack: {:?}", xs.stack());
                }
            }
            Err(e) => eprintln!("{}: {}", filename, e),
        }
        if matches.opt_present("q") {
            return;
        }
    }

    vorth::repl::console_repl(&mut xs, true);
}
