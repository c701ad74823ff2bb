//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./server-lite --port 9000 \
//!   --base-dir ./public \
//!   --chunk-size 7 \
//!   --backlog 0
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=9000 HTTP_HOST=0.0.0.0 ./server-lite
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "server-lite")]
#[command(about = "Servidor HTTP/1.1 mínimo con parser incremental sobre TCP")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "9000", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio base contra el que se resuelven los paths de los requests
    ///
    /// El path crudo del request se concatena a este directorio sin
    /// normalización alguna (igual que el diseño original: `..` funciona).
    #[arg(long, default_value = ".", env = "BASE_DIR")]
    pub base_dir: String,

    /// Backlog del socket de escucha (conexiones pendientes de accept)
    ///
    /// 0 delega el tamaño de la cola al sistema operativo.
    #[arg(long, default_value = "0", env = "HTTP_BACKLOG")]
    pub backlog: i32,

    /// Bytes leídos del socket por cada recv
    ///
    /// Un valor pequeño fuerza el caso de entrega parcial: ninguna línea
    /// llega completa en una sola lectura. Cualquier valor >= 1 produce el
    /// mismo resultado observable.
    #[arg(long = "chunk-size", default_value = "7", env = "CHUNK_SIZE")]
    pub chunk_size: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use server_lite::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:9000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("Chunk size must be >= 1".to_string());
        }

        if self.backlog < 0 {
            return Err("Backlog must be >= 0".to_string());
        }

        if self.base_dir.is_empty() {
            return Err("Base dir must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:    {}", self.address());
        println!("   Base dir:   {}", self.base_dir);
        println!("   Backlog:    {}", self.backlog);
        println!("   Chunk size: {} bytes", self.chunk_size);
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 9000,
            host: "127.0.0.1".to_string(),
            base_dir: ".".to_string(),
            backlog: 0,
            chunk_size: 7,
        }
    }
}
