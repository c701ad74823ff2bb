//! # Servidor TCP Secuencial
//! src/server/tcp.rs
//!
//! Ciclo de vida de una conexión: accept → buffer incremental →
//! parser → dispatch → response → cerrar. Todo sobre el único thread
//! del proceso; cada llamada de I/O bloquea.
//!
//! Limitación conocida (heredada del diseño original y reproducida a
//! propósito): no hay timeouts, así que un cliente que conecta y no
//! envía nada bloquea el proceso entero dentro del read.
//!
//! A diferencia del original (que atendía una sola conexión y
//! terminaba), el ciclo de accept sigue vivo: ningún fallo local a un
//! request lo tumba.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::time::Instant;

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::fs::{LocalFs, ResourceProvider};
use crate::http::{ParseError, Request, Response, StatusCode};
use crate::server::connection::Connection;

/// Servidor HTTP/1.1 secuencial
pub struct Server {
    config: Config,
    dispatcher: Dispatcher<LocalFs>,
}

impl Server {
    /// Crea el servidor con su dispatcher sobre el directorio base
    pub fn new(config: Config) -> Self {
        let dispatcher = Dispatcher::new(config.base_dir.clone(), LocalFs);
        Self { config, dispatcher }
    }

    /// Construye el listener y atiende conexiones indefinidamente
    pub fn run(&self) -> io::Result<()> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = Self::create_listener(&self.config)?;
        println!("[+] Servidor escuchando en {}", address);
        println!("[*] Modo secuencial: una conexión a la vez\n");

        self.serve(listener)
    }

    /// Crea el socket de escucha: IPv4/TCP, SO_REUSEADDR y el backlog
    /// configurado
    ///
    /// `std::net::TcpListener::bind` no permite fijar ninguna de las dos
    /// cosas, por eso el socket se arma a mano con `socket2`.
    fn create_listener(config: &Config) -> io::Result<TcpListener> {
        let addr: SocketAddr = config
            .address()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
        // Re-usar la dirección: matar el servidor y relanzarlo al instante
        // sin que el kernel se queje de que el puerto sigue ocupado
        socket.set_reuse_address(true)?;
        socket.bind(&addr.into())?;
        socket.listen(config.backlog)?;

        Ok(socket.into())
    }

    /// Ciclo de accept sobre un listener ya construido
    ///
    /// Separado de [`run`](Server::run) para que los tests puedan servir
    /// sobre un puerto efímero.
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    println!(" ✅ Nueva conexión desde: {}", peer_addr);

                    if let Err(e) =
                        handle_connection(stream, &self.dispatcher, self.config.chunk_size)
                    {
                        eprintln!("   ❌ Error en la conexión: {}", e);
                    }
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }
}

/// Atiende una conexión ya aceptada: un request, una response
///
/// Toma cualquier stream bidireccional de bytes, no solo un
/// `TcpStream`: los tests alimentan streams en memoria.
///
/// Política de errores:
/// - Request malformado → 400 con mensaje de texto plano
/// - Peer cerró a mitad del request → se descarta sin respuesta
/// - Fallo del proveedor de recursos → se loggea y se cierra sin
///   respuesta (fatal para el request, no para el proceso)
pub fn handle_connection<S, P>(
    mut stream: S,
    dispatcher: &Dispatcher<P>,
    chunk_size: usize,
) -> io::Result<()>
where
    S: Read + Write,
    P: ResourceProvider,
{
    let start = Instant::now();

    // Cada conexión es dueña de un buffer fresco; no hay reuso
    let parsed = {
        let mut conn = Connection::new(&mut stream, chunk_size);
        Request::read_from(&mut conn)
    };

    let response = match parsed {
        Ok(request) => {
            println!("   ➜ {} {} {}", request.method(), request.path(), request.version());

            match dispatcher.dispatch(&request) {
                Ok(response) => response,
                Err(e) => {
                    eprintln!("   ❌ Error resolviendo recurso: {}", e);
                    return Ok(());
                }
            }
        }
        Err(ParseError::ConnectionClosed) => {
            println!("   ⚠️  Conexión cerrada antes de completar el request");
            return Ok(());
        }
        Err(ParseError::Io(e)) => return Err(e),
        Err(e) => {
            eprintln!("   ❌ Parse error: {}", e);
            Response::error(StatusCode::BadRequest, &format!("Invalid request: {}", e))
        }
    };

    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    let latency = start.elapsed();
    println!("   ✅ {} ({:.2}ms)\n", response.status(), latency.as_secs_f64() * 1000.0);

    Ok(())
}
