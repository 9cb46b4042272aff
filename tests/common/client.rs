//! Test hubchat client.
//!
//! Sends raw protocol lines and reads replies one line at a time.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    name: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server. `name` is the username, sigil included.
    pub async fn connect(address: &str, name: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send a command line, appending CRLF if it has no terminator.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Send bytes exactly as given.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send a length-prefixed MSG.
    pub async fn msg(&mut self, recipient: &str, body: &str) -> anyhow::Result<()> {
        let frame = format!("MSG {} {}\r\n{}", recipient, body.len(), body);
        self.send_bytes(frame.as_bytes()).await
    }

    /// Receive one line, without its trailing newline.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive one line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(line)
    }

    /// Receive lines until the predicate matches, returning all of them.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Assert that nothing arrives for `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(line) => anyhow::bail!("unexpected line: {line:?}"),
            Err(_) => Ok(()),
        }
    }

    /// Send a command and return the single reply line.
    pub async fn request(&mut self, line: &str) -> anyhow::Result<String> {
        self.send_raw(line).await?;
        self.recv().await
    }

    /// Register under this client's name.
    pub async fn register(&mut self) -> anyhow::Result<()> {
        let reply = self.request(&format!("REG {}", self.name)).await?;
        let expected = format!("->> REG OK: registered as {}", self.name);
        if reply != expected {
            anyhow::bail!("Registration failed: {reply}");
        }
        Ok(())
    }

    /// Join a channel, expecting an OK reply.
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<String> {
        let reply = self.request(&format!("JOIN {}", channel)).await?;
        if !reply.starts_with("->> JOIN OK:") {
            anyhow::bail!("JOIN failed: {reply}");
        }
        Ok(reply)
    }

    /// Close the connection.
    pub async fn quit(mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
