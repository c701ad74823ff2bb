//! Tests de integración end-to-end del servidor
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor sobre un puerto efímero y un
//! directorio temporal, así la suite no depende de ningún proceso
//! externo corriendo.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use server_lite::config::Config;
use server_lite::server::Server;

/// Helper: levanta un servidor sirviendo `base_dir` en un puerto
/// efímero y retorna su dirección
fn spawn_server(base_dir: &str) -> SocketAddr {
    let mut config = Config::default();
    config.base_dir = base_dir.to_string();
    // Granularidad chica a propósito: ninguna línea llega en un solo read
    config.chunk_size = 3;

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local_addr");

    let server = Server::new(config);
    thread::spawn(move || {
        let _ = server.serve(listener);
    });

    addr
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");
    stream
        .set_write_timeout(Some(Duration::from_secs(5)))
        .expect("write timeout");

    stream.write_all(raw).expect("write");
    stream.flush().expect("flush");
    stream.shutdown(std::net::Shutdown::Write).expect("shutdown");

    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read");
    response
}

/// Helper: request GET simple
fn send_request(addr: SocketAddr, path: &str) -> String {
    send_raw(addr, format!("GET {} HTTP/1.1\r\n\r\n", path).as_bytes())
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    // Buscar la línea vacía que separa headers del body
    if let Some(pos) = response.find("\r\n\r\n") {
        &response[pos + 4..]
    } else {
        ""
    }
}

#[test]
fn test_serves_plain_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("hola.txt"), "hola desde un archivo\n").expect("write");
    let addr = spawn_server(&dir.path().to_string_lossy());

    let response = send_request(addr, "/hola.txt");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert!(response.contains("Content-Length: 22\r\n"));
    assert_eq!(extract_body(&response), "hola desde un archivo\n");
}

#[test]
fn test_not_found_has_empty_body() {
    let dir = tempfile::tempdir().expect("tempdir");
    let addr = spawn_server(&dir.path().to_string_lossy());

    let response = send_request(addr, "/no-existe.txt");

    assert!(response.starts_with("HTTP/1.1 404 NOT FOUND\r\n"), "got: {}", response);
    assert!(response.contains("Content-Length: 0\r\n"));
    assert_eq!(extract_body(&response), "");
}

#[cfg(unix)]
#[test]
fn test_executable_serves_captured_stdout() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("app.sh");
    std::fs::write(&script, "#!/bin/sh\necho salida dinamica\n").expect("write");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    let addr = spawn_server(&dir.path().to_string_lossy());

    let response = send_request(addr, "/app.sh");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert_eq!(extract_body(&response), "salida dinamica\n");
}

#[test]
fn test_request_dripped_byte_by_byte() {
    // El cliente entrega el request gota a gota: el delimitador CRLF
    // queda partido entre lecturas y el resultado no cambia
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("f.txt"), "contenido").expect("write");
    let addr = spawn_server(&dir.path().to_string_lossy());

    let raw = b"GET /f.txt HTTP/1.1\r\nHost: localhost\r\n\r\n";
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");

    for byte in raw {
        stream.write_all(&[*byte]).expect("write");
        stream.flush().expect("flush");
    }
    stream.shutdown(std::net::Shutdown::Write).expect("shutdown");

    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert_eq!(extract_body(&response), "contenido");
}

#[test]
fn test_malformed_request_line_gets_400() {
    let dir = tempfile::tempdir().expect("tempdir");
    let addr = spawn_server(&dir.path().to_string_lossy());

    let response = send_raw(addr, b"GET\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 400 BAD REQUEST\r\n"), "got: {}", response);
}

#[test]
fn test_malformed_header_gets_400() {
    let dir = tempfile::tempdir().expect("tempdir");
    let addr = spawn_server(&dir.path().to_string_lossy());

    let response = send_raw(addr, b"GET /x HTTP/1.1\r\nheader-sin-dos-puntos\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 400 BAD REQUEST\r\n"), "got: {}", response);
}

#[test]
fn test_server_survives_bad_request_and_keeps_serving() {
    // Un fallo local a un request no tumba el ciclo de accept
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("ok.txt"), "sigo vivo").expect("write");
    let addr = spawn_server(&dir.path().to_string_lossy());

    let bad = send_raw(addr, b"GET\r\n\r\n");
    assert!(bad.contains("400"));

    // Peer que conecta y cierra sin mandar nada
    drop(TcpStream::connect(addr).expect("connect"));

    let good = send_request(addr, "/ok.txt");
    assert!(good.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", good);
    assert_eq!(extract_body(&good), "sigo vivo");
}

#[test]
fn test_multiple_requests_sequentially() {
    // Verificar que el servidor puede manejar múltiples requests
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("a.txt"), "aaa").expect("write");
    let addr = spawn_server(&dir.path().to_string_lossy());

    for i in 0..5 {
        let response = send_request(addr, "/a.txt");
        assert!(response.contains("200 OK"), "Request {} failed: {}", i, response);
    }
}

#[test]
fn test_binary_file_served_verbatim() {
    let dir = tempfile::tempdir().expect("tempdir");
    let payload: Vec<u8> = vec![0x00, 0x01, 0xFE, 0xFF, 0x0A, 0x0D];
    std::fs::write(dir.path().join("bin.dat"), &payload).expect("write");
    let addr = spawn_server(&dir.path().to_string_lossy());

    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");
    stream.write_all(b"GET /bin.dat HTTP/1.1\r\n\r\n").expect("write");
    stream.shutdown(std::net::Shutdown::Write).expect("shutdown");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read");

    let header_end = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header end");
    assert_eq!(&response[header_end + 4..], &payload[..]);

    let head = String::from_utf8_lossy(&response[..header_end]);
    assert!(head.contains("Content-Length: 6"));
}
