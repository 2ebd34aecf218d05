/// Startup banner. Kept narrow so it survives small terminals.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!("\x1b[32m");
    println!(r"        *                    ");
    println!(r"       /.\      T I N S E L  ");
    println!(r"      /..'\                  ");
    println!(r"      /'.'\   festive poster ");
    println!(r"     /.''.'\      studio     ");
    println!(r"     /.'.'.\                 ");
    println!(r"    /'.''.'.\     v{version} ");
    println!(r"    ^^^[_]^^^                ");
    println!("\x1b[0m");
}
