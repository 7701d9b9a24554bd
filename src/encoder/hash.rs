use super::{EncodeError, Encoder};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Bigrams count for half a unigram.
const BIGRAM_WEIGHT: f32 = 0.5;

/// Bag-of-words feature hashing encoder.
///
/// Lowercased alphanumeric tokens and adjacent token pairs are hashed (FNV-1a)
/// into a fixed number of buckets and the result is L2-normalized. All
/// components are non-negative, so similarities land in [0, 1]. Output depends
/// only on the input text, which makes runs reproducible without model files.
#[derive(Debug, Clone)]
pub struct HashEncoder {
    dimensions: usize,
}

impl HashEncoder {
    pub const DEFAULT_DIMENSIONS: usize = 384;

    pub fn new(dimensions: usize) -> Self {
        HashEncoder {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn bucket(&self, feature: &str) -> usize {
        (fnv1a(feature.as_bytes()) % self.dimensions as u64) as usize
    }
}

impl Default for HashEncoder {
    fn default() -> Self {
        HashEncoder::new(Self::DEFAULT_DIMENSIONS)
    }
}

impl Encoder for HashEncoder {
    fn name(&self) -> &str {
        "hash"
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EncodeError> {
        let tokens = tokenize(text);
        let mut vector = vec![0.0f32; self.dimensions];

        for token in &tokens {
            vector[self.bucket(token)] += 1.0;
        }
        for pair in tokens.windows(2) {
            vector[self.bucket(&format!("{} {}", pair[0], pair[1]))] += BIGRAM_WEIGHT;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(vector)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}
