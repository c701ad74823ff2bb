//! # server-lite - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.
//!
//! La configuración se toma de argumentos CLI y variables de entorno.

use server_lite::config::Config;
use server_lite::server::Server;

fn main() {
    println!("=================================");
    println!("  server-lite HTTP/1.1");
    println!("=================================\n");

    // Crear configuración desde CLI args y variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Crear el servidor
    let server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
