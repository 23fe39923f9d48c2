//! Binary weights format.
//!
//! A weights blob is every hidden and output weight, written as an 8-byte
//! big-endian IEEE-754 double. Layers go in construction order (the input
//! layer is skipped), neurons in id order and weights in index order. There
//! is no header and no length prefix, so a blob only makes sense for a network
//! with the same layer sizes as the one that wrote it.
//!
//! Loading checks the blob length against the topology and applies nothing
//! unless the whole blob fits.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::layer::LayerKind;
use crate::{Error, Layer, Network, Result};

const WEIGHT_SIZE: usize = std::mem::size_of::<f64>();

impl Network {
    /// Number of weights a blob for this topology holds.
    pub fn weight_count(&self) -> usize {
        self.trainable_layers().map(|layer| layer.weight_count()).sum()
    }

    /// Size in bytes of a blob for this topology.
    #[inline]
    pub fn weights_byte_len(&self) -> usize {
        self.weight_count() * WEIGHT_SIZE
    }

    fn trainable_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers()
            .iter()
            .filter(|layer| layer.kind() != LayerKind::Input)
    }

    pub fn weights_to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.weights_byte_len());
        for layer in self.trainable_layers() {
            for neuron in layer.neurons() {
                for w in neuron.weights() {
                    bytes.extend_from_slice(&w.to_be_bytes());
                }
            }
        }
        bytes
    }

    /// Replaces every weight from `bytes`, which must be exactly
    /// [`Network::weights_byte_len`] long.
    pub fn load_weights_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let expected = self.weights_byte_len();
        if bytes.len() != expected {
            return Err(Error::mismatch("weights blob", expected, bytes.len()));
        }

        let mut chunks = bytes.chunks_exact(WEIGHT_SIZE);
        let mut weights = Vec::new();
        for layer in self.layers_mut() {
            if layer.kind() == LayerKind::Input {
                continue;
            }
            for neuron in layer.neurons_mut() {
                weights.clear();
                for chunk in chunks.by_ref().take(neuron.fan_in()) {
                    let mut raw = [0_u8; WEIGHT_SIZE];
                    raw.copy_from_slice(chunk);
                    weights.push(f64::from_be_bytes(raw));
                }
                neuron.set_weights(&weights);
            }
        }
        Ok(())
    }

    /// Writes the blob to `writer`.
    pub fn write_weights<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.weights_to_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Reads exactly one blob from `reader`.
    ///
    /// Trailing bytes are left unread. A short stream fails with an
    /// `UnexpectedEof` I/O error and leaves the weights untouched.
    pub fn read_weights<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut bytes = vec![0_u8; self.weights_byte_len()];
        reader.read_exact(&mut bytes)?;
        self.load_weights_from_bytes(&bytes)
    }

    pub fn save_weights<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_weights(BufWriter::new(file))?;
        log::info!(
            "saved {} weights to {}",
            self.weight_count(),
            path.display()
        );
        Ok(())
    }

    /// Loads a weights file whose length must match this topology exactly.
    pub fn load_weights<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut bytes = Vec::with_capacity(self.weights_byte_len());
        BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
        self.load_weights_from_bytes(&bytes)?;
        log::info!(
            "loaded {} weights from {}",
            self.weight_count(),
            path.display()
        );
        Ok(())
    }

    /// Loads `path` only if it exists and is not empty.
    ///
    /// Returns whether weights were loaded.
    pub fn load_weights_if_present<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(meta) if meta.len() > 0 => {
                self.load_weights(path)?;
                Ok(true)
            }
            Ok(_) => {
                log::debug!("{} is empty, keeping current weights", path.display());
                Ok(false)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found, keeping current weights", path.display());
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Network {
        let mut n = Network::new_with_seed(2, 2, 1, 0).unwrap();
        n.layers_mut()[1].neurons_mut()[0].set_weights(&[0.5, -0.25]);
        n.layers_mut()[1].neurons_mut()[1].set_weights(&[1.0, 2.0]);
        n.layers_mut()[2].neurons_mut()[0].set_weights(&[-1.5, 0.125]);
        n
    }

    #[test]
    fn blob_is_big_endian_in_traversal_order() {
        let n = tiny();
        assert_eq!(n.weight_count(), 6);

        let bytes = n.weights_to_bytes();
        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[..8], &[0x3F, 0xE0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..16], &(-0.25_f64).to_be_bytes());
        assert_eq!(&bytes[16..24], &1.0_f64.to_be_bytes());
        assert_eq!(&bytes[40..48], &0.125_f64.to_be_bytes());
    }

    #[test]
    fn bytes_load_back_into_same_topology() {
        let src = tiny();
        let mut dst = Network::new_with_seed(2, 2, 1, 9).unwrap();
        dst.load_weights_from_bytes(&src.weights_to_bytes()).unwrap();
        assert_eq!(dst.layer(crate::LayerId::OUTPUT).neurons()[0].weights(), &[-1.5, 0.125]);
        assert_eq!(dst.weights_to_bytes(), src.weights_to_bytes());
    }

    #[test]
    fn wrong_length_is_rejected_without_changes() {
        let mut n = tiny();
        let before = n.weights_to_bytes();
        let err = n.load_weights_from_bytes(&before[..40]).unwrap_err();
        assert!(matches!(
            err,
            Error::TopologyMismatch { expected: 48, actual: 40, .. }
        ));
        assert_eq!(n.weights_to_bytes(), before);
    }

    #[test]
    fn stream_read_stops_after_one_blob() {
        let src = tiny();
        let mut stream = Vec::new();
        src.write_weights(&mut stream).unwrap();
        stream.extend_from_slice(b"tail");

        let mut reader = io::Cursor::new(stream);
        let mut dst = Network::new_with_seed(2, 2, 1, 1).unwrap();
        dst.read_weights(&mut reader).unwrap();
        assert_eq!(dst.weights_to_bytes(), src.weights_to_bytes());
        assert_eq!(reader.position(), 48);
    }

    #[test]
    fn truncated_stream_is_unexpected_eof() {
        let src = tiny();
        let bytes = src.weights_to_bytes();
        let mut dst = Network::new_with_seed(2, 2, 1, 1).unwrap();
        match dst.read_weights(&bytes[..20]) {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }
}
