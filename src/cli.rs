// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    let is_board = binary_name.contains("board");

    println!(
        "Scoutdesk v{} - {}",
        env!("CARGO_PKG_VERSION"),
        if is_board {
            "content planning board"
        } else {
            "property scout"
        }
    );
    println!();
    println!("USAGE:");
    if is_board {
        println!("    {} [--root <path>]", binary_name);
        println!("    {} export", binary_name);
        println!("    {} import <file.json>", binary_name);
        println!("    {} --help", binary_name);
    } else {
        println!("    {} [--root <path>]", binary_name);
        println!("    {} --help", binary_name);
    }
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();

    if is_board {
        println!("EXPORT COMMAND:");
        println!(
            "    {} export                    Print the board as a JSON array",
            binary_name
        );
        println!(
            "    {} export > backup.json      Save the board to a file",
            binary_name
        );
        println!();
        println!("IMPORT COMMAND:");
        println!(
            "    {} import backup.json        Merge a previously exported file",
            binary_name
        );
        println!();
        println!("    Import accepts only a top-level JSON array. Items with a known id");
        println!("    replace the stored entry; everything else is appended.");
        println!();
    } else {
        println!("CONFIGURATION:");
        println!("    The backend URL lives in config.toml (first run walks you through it).");
        println!();
    }

    println!("KEYBINDINGS:");
    println!("    Press '?' inside the app for interactive help");
}
