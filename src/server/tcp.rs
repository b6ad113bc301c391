//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Acepta conexiones y corre el pipeline leer → parsear → despachar →
//! escribir sobre cada una. Dos modos:
//!
//! - **Sequential**: la conexión se atiende completa en el thread del
//!   `accept` antes de aceptar la siguiente.
//! - **Pool**: la conexión se encola en un pool de `workers` threads. Si ya
//!   hay `max_queued` conexiones esperando, se responde 503 y se cierra.
//!
//! `ShutdownHandle::shutdown` detiene el loop de `accept`; `run` espera a
//! que el pool termine las conexiones en curso antes de retornar. La
//! conexión que se acepta junto con la señal también se atiende.

use crate::config::{Config, ServeMode};
use crate::handlers::FileStore;
use crate::http::{ReadError, RequestReader, Response, ResponseWriter, StatusCode};
use crate::router::{Dispatcher, Router};
use log::{debug, error, info, warn};
use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use threadpool::ThreadPool;

/// Tiempo máximo que se espera al cliente al cerrar una conexión rechazada
const DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

/// Bytes que se descartan como máximo al cerrar una conexión rechazada
const DRAIN_LIMIT: u64 = 1024 * 1024;

/// Límites que se aplican a cada conexión
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    /// Tamaño máximo del request completo
    pub max_request_size: usize,

    /// Timeout de lectura del socket
    pub read_timeout: Option<Duration>,
}

impl ConnectionLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_request_size: config.max_request_size,
            read_timeout: match config.read_timeout_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
        }
    }
}

/// Detiene un `Server` desde otro thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    /// Marca el servidor para detenerse y despierta el `accept` bloqueado
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);

        // Una conexión propia desbloquea `accept`; si falla, el loop igual
        // termina en la próxima conexión entrante
        if let Err(e) = TcpStream::connect(self.wake_addr) {
            debug!("shutdown: no se pudo despertar el listener: {}", e);
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Servidor HTTP/1.1
pub struct Server {
    config: Config,
    dispatcher: Arc<Dispatcher>,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Hace bind en `config.address()` con las rutas registradas en `router`
    ///
    /// Con `port = 0` el sistema elige un puerto libre; ver `local_addr`.
    pub fn bind(config: Config, router: Router) -> io::Result<Self> {
        let address = config.address();
        let listener = TcpListener::bind(&address)?;
        info!("Servidor escuchando en {}", listener.local_addr()?);

        let files = FileStore::new(&config.directory);
        let dispatcher = Arc::new(Dispatcher::new(router, files));

        Ok(Self {
            config,
            dispatcher,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Dirección real en la que escucha
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle para detener el servidor desde otro thread
    pub fn shutdown_handle(&self) -> io::Result<ShutdownHandle> {
        let mut wake_addr = self.local_addr()?;

        // No se puede conectar a 0.0.0.0 / :: en todas las plataformas
        if wake_addr.ip().is_unspecified() {
            let loopback = match wake_addr.ip() {
                IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
                IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
            };
            wake_addr.set_ip(loopback);
        }

        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            wake_addr,
        })
    }

    /// Corre el loop de `accept` hasta que se pida shutdown
    pub fn run(&self) -> io::Result<()> {
        let limits = ConnectionLimits::from_config(&self.config);

        match self.config.mode {
            ServeMode::Sequential => {
                info!("Modo secuencial: una conexión a la vez");
                self.run_sequential(limits);
            }
            ServeMode::Pool => {
                info!(
                    "Modo pool: {} workers, hasta {} conexiones en cola",
                    self.config.workers, self.config.max_queued
                );
                self.run_pool(limits);
            }
        }

        info!("Servidor detenido");
        Ok(())
    }

    fn run_sequential(&self, limits: ConnectionLimits) {
        for stream in self.listener.incoming() {
            // Lo aceptado antes de ver la señal se atiende igual: puede ser un
            // cliente real que llegó antes que la conexión de wake-up
            let stopping = self.shutdown.load(Ordering::SeqCst);

            match stream {
                Ok(stream) => {
                    if let Err(e) = Self::handle_connection(stream, &self.dispatcher, limits) {
                        warn!("Error en conexión: {}", e);
                    }
                }
                Err(e) => error!("Error al aceptar conexión: {}", e),
            }

            if stopping {
                break;
            }
        }
    }

    fn run_pool(&self, limits: ConnectionLimits) {
        let pool = ThreadPool::with_name("minihttp-worker".to_string(), self.config.workers);

        for stream in self.listener.incoming() {
            let stopping = self.shutdown.load(Ordering::SeqCst);

            match stream {
                Ok(stream) => self.submit(&pool, stream, limits),
                Err(e) => error!("Error al aceptar conexión: {}", e),
            }

            if stopping {
                break;
            }
        }

        // Drenar las conexiones en curso
        debug!("Esperando {} conexiones activas", pool.active_count() + pool.queued_count());
        pool.join();
    }

    /// Encola la conexión en el pool, o responde 503 si la cola está llena
    fn submit(&self, pool: &ThreadPool, stream: TcpStream, limits: ConnectionLimits) {
        let max_queued = self.config.max_queued;

        if max_queued > 0 && pool.queued_count() >= max_queued {
            warn!("Cola llena ({} conexiones esperando), respondiendo 503", pool.queued_count());
            Self::reject(stream);
            return;
        }

        let dispatcher = Arc::clone(&self.dispatcher);
        pool.execute(move || {
            if let Err(e) = Self::handle_connection(stream, &dispatcher, limits) {
                warn!("Error en conexión: {}", e);
            }
        });
    }

    /// Responde 503 sin leer el request
    fn reject(mut stream: TcpStream) {
        let mut response = Response::new(StatusCode::ServiceUnavailable);
        match ResponseWriter::write_to(&mut response, &mut stream) {
            Ok(()) => Self::close_gracefully(stream),
            Err(e) => debug!("No se pudo enviar 503: {}", e),
        }
    }

    /// Cierra una conexión cuyo request quedó sin leer
    ///
    /// Si el socket se cierra con datos pendientes en el buffer de
    /// recepción, el kernel manda RST y el cliente puede perder la
    /// respuesta ya enviada. Se cierra primero la mitad de escritura y se
    /// descarta lo que siga llegando, acotado por `DRAIN_LIMIT` y
    /// `DRAIN_TIMEOUT`.
    fn close_gracefully(mut stream: TcpStream) {
        if let Err(e) = stream.shutdown(Shutdown::Write) {
            debug!("shutdown(Write) falló: {}", e);
            return;
        }
        if let Err(e) = stream.set_read_timeout(Some(DRAIN_TIMEOUT)) {
            debug!("No se pudo fijar el timeout de drenado: {}", e);
            return;
        }

        match io::copy(&mut stream.by_ref().take(DRAIN_LIMIT), &mut io::sink()) {
            Ok(n) => debug!("{} bytes descartados al cerrar", n),
            Err(e) => debug!("Drenado interrumpido: {}", e),
        }
    }

    /// Atiende una conexión completa: un request, una respuesta
    ///
    /// La conexión se cierra al salir (el `TcpStream` se libera en todos
    /// los caminos, incluidos los de error).
    pub fn handle_connection(
        mut stream: TcpStream,
        dispatcher: &Dispatcher,
        limits: ConnectionLimits,
    ) -> io::Result<()> {
        let start = Instant::now();
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_read_timeout(limits.read_timeout)?;

        let reader = RequestReader::new(limits.max_request_size);
        // `unread`: quedó parte del request en el socket
        let (mut response, unread) = match reader.read_request(&mut stream) {
            Ok(Some(raw)) => {
                debug!("{} bytes desde {}", raw.len(), peer);
                (dispatcher.handle(&raw), false)
            }
            Ok(None) => {
                debug!("Conexión cerrada por {} sin datos", peer);
                return Ok(());
            }
            Err(ReadError::TooLarge { limit }) => {
                warn!("Request de {} supera {} bytes", peer, limit);
                (Response::new(StatusCode::PayloadTooLarge), true)
            }
            Err(ReadError::Io(e)) => return Err(e),
        };

        ResponseWriter::write_to(&mut response, &mut stream)?;

        info!(
            "{} → {} ({:.2}ms)",
            peer,
            response.status(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        if unread {
            Self::close_gracefully(stream);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::thread;

    fn ephemeral_listener() -> TcpListener {
        TcpListener::bind("127.0.0.1:0").expect("bind")
    }

    fn limits() -> ConnectionLimits {
        ConnectionLimits {
            max_request_size: 1024,
            read_timeout: Some(Duration::from_secs(5)),
        }
    }

    /// Acepta una conexión, la atiende con `handle_connection` y retorna
    /// lo que recibió el cliente
    fn roundtrip(request: &[u8]) -> String {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let dispatcher = Dispatcher::new(Router::new(), FileStore::new(""));
            let (stream, _) = listener.accept().unwrap();
            Server::handle_connection(stream, &dispatcher, limits()).unwrap();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(request).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        t.join().unwrap();

        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_handle_connection_echo() {
        let text = roundtrip(b"GET /echo/abc HTTP/1.1\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 3\r\n"));
        assert!(text.ends_with("\r\n\r\nabc"));
    }

    #[test]
    fn test_handle_connection_not_found() {
        let text = roundtrip(b"GET /nope HTTP/1.1\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
    }

    #[test]
    fn test_handle_connection_parse_error() {
        let text = roundtrip(b"\x00\x01\x02\x03garbage\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[test]
    fn test_handle_connection_too_large() {
        // El límite se detecta con el Content-Length declarado, antes del body
        let text = roundtrip(b"POST /files/x HTTP/1.1\r\nContent-Length: 4096\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
    }

    #[test]
    fn test_too_large_body_still_delivers_response() {
        // Body muy superior al límite que queda sin leer en el socket
        let mut request = b"POST /files/x HTTP/1.1\r\nContent-Length: 200000\r\n\r\n".to_vec();
        request.extend_from_slice(&vec![b'a'; 200_000]);

        let text = roundtrip(&request);

        assert!(text.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let dispatcher = Dispatcher::new(Router::new(), FileStore::new(""));
            let (stream, _) = listener.accept().unwrap();
            // El read retorna 0 y la función debe terminar Ok(())
            Server::handle_connection(stream, &dispatcher, limits()).unwrap();
        });

        drop(TcpStream::connect(addr).unwrap());

        t.join().unwrap();
    }

    #[test]
    fn test_read_timeout_closes_connection() {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let dispatcher = Dispatcher::new(Router::new(), FileStore::new(""));
            let (stream, _) = listener.accept().unwrap();
            let limits = ConnectionLimits {
                max_request_size: 1024,
                read_timeout: Some(Duration::from_millis(50)),
            };
            Server::handle_connection(stream, &dispatcher, limits)
        });

        // Cliente que manda medio request y se queda callado
        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET /echo/x HTTP/1.1\r\n").unwrap();

        let result = t.join().unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_shutdown_handle_unspecified_address() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 0;

        let server = Server::bind(config, Router::new()).unwrap();
        let handle = server.shutdown_handle().unwrap();

        assert!(handle.wake_addr.ip().is_loopback());
        assert!(!handle.is_shutdown());
    }

    #[test]
    fn test_shutdown_serves_connection_accepted_with_signal() {
        let mut config = Config::default();
        config.port = 0;
        config.mode = ServeMode::Sequential;

        let server = Server::bind(config, Router::new()).unwrap();
        let addr = server.local_addr().unwrap();
        let handle = server.shutdown_handle().unwrap();

        // El cliente queda en el backlog antes que la conexión de wake-up
        let mut client = TcpStream::connect(addr).unwrap();
        client.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        client.write_all(b"GET /echo/last HTTP/1.1\r\n\r\n").unwrap();
        handle.shutdown();

        let t = thread::spawn(move || server.run());

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        t.join().unwrap().unwrap();

        let text = String::from_utf8_lossy(&buf);
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.ends_with("\r\n\r\nlast"));
    }
}
