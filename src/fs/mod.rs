//! # Proveedor de Recursos
//! src/fs/mod.rs
//!
//! Este módulo define el contrato con el mundo exterior que consume el
//! dispatcher: existencia de un path, bit de ejecución, lectura de
//! bytes y ejecución de un programa capturando su stdout.
//!
//! El contrato es un trait para que la lógica de dispatch sea testeable
//! contra un proveedor falso, sin tocar el filesystem real ni lanzar
//! subprocesos.

use std::io;
use std::path::Path;
use std::process::Command;

/// Contrato del colaborador filesystem/subprocesos
///
/// Estos cuatro puntos son los únicos donde el core toca el mundo
/// exterior además del socket.
pub trait ResourceProvider {
    /// ¿Existe un recurso en este path?
    fn exists(&self, path: &str) -> bool;

    /// ¿Está el recurso marcado como ejecutable?
    fn is_executable(&self, path: &str) -> bool;

    /// Lee el contenido completo del recurso
    fn read_all(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Ejecuta el recurso como subproceso y captura su stdout
    ///
    /// El subproceso hereda el environment del servidor (estilo CGI).
    fn execute_capturing_stdout(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Implementación real sobre el filesystem local
///
/// El chequeo de ejecución mira los bits de permiso Unix; en otras
/// plataformas ningún recurso se considera ejecutable.
pub struct LocalFs;

impl ResourceProvider for LocalFs {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn is_executable(&self, path: &str) -> bool {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            match std::fs::metadata(path) {
                Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
                Err(_) => false,
            }
        }

        #[cfg(not(unix))]
        {
            let _ = path;
            false
        }
    }

    fn read_all(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn execute_capturing_stdout(&self, path: &str) -> io::Result<Vec<u8>> {
        let output = Command::new(path).output()?;
        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str, mode: u32) -> String {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(content.as_bytes()).expect("write");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).expect("chmod");
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(&dir, "hola.txt", "hola\n", 0o644);

        let fs = LocalFs;
        assert!(fs.exists(&path));
        assert!(!fs.exists(&format!("{}.no-existe", path)));
    }

    #[test]
    fn test_is_executable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let plain = write_file(&dir, "plano.txt", "datos", 0o644);
        let script = write_file(&dir, "script.sh", "#!/bin/sh\necho hola\n", 0o755);

        let fs = LocalFs;
        assert!(!fs.is_executable(&plain));
        assert!(fs.is_executable(&script));
    }

    #[test]
    fn test_is_executable_missing_path() {
        let fs = LocalFs;
        assert!(!fs.is_executable("/no/existe/para/nada"));
    }

    #[test]
    fn test_read_all() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(&dir, "contenido.txt", "línea uno\nlínea dos\n", 0o644);

        let fs = LocalFs;
        let bytes = fs.read_all(&path).expect("read_all");
        assert_eq!(bytes, "línea uno\nlínea dos\n".as_bytes());
    }

    #[test]
    fn test_execute_capturing_stdout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = write_file(&dir, "saluda.sh", "#!/bin/sh\necho salida dinamica\n", 0o755);

        let fs = LocalFs;
        let stdout = fs.execute_capturing_stdout(&script).expect("execute");
        assert_eq!(stdout, b"salida dinamica\n");
    }

    #[test]
    fn test_execute_failure_surfaces_error() {
        let fs = LocalFs;
        let result = fs.execute_capturing_stdout("/no/existe/binario");
        assert!(result.is_err());
    }
}
