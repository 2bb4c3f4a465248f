//! This is the namespace for all parts dealing with data in sampled waves.

/// Number of samples covering `duration` seconds at `sample_rate`.
pub fn sample_count(duration: f64, sample_rate: f64) -> usize {
    (duration * sample_rate).round() as usize
}

/// A buffer holding mono floating point audio data.
#[derive(Debug)]
pub struct AudioBuffer {
    samples: Vec<f64>,
}

#[allow(clippy::len_without_is_empty)]
impl AudioBuffer {
    pub fn new(sample_count: usize) -> Self {
        Self {
            samples: vec![0.0; sample_count],
        }
    }

    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Set all samples to zero.
    pub fn fill_zero(&mut self) {
        self.samples.iter_mut().for_each(|s| *s = 0.0);
    }

    /// Size of the buffer in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Size of the buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * std::mem::size_of::<f64>()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    /// Add the given samples into this buffer, starting at `offset`.
    /// Samples reaching past the end of the buffer are dropped.
    pub fn mix_at(&mut self, offset: usize, samples: &[f64]) {
        if offset >= self.samples.len() {
            return;
        }
        for (target, sample) in self.samples[offset..].iter_mut().zip(samples) {
            *target += sample;
        }
    }

    /// The largest absolute sample value, zero for an empty buffer.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, s| f64::max(peak, s.abs()))
    }

    /// Multiply every sample by a constant factor.
    pub fn scale(&mut self, factor: f64) {
        self.samples.iter_mut().for_each(|s| *s *= factor);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seconds_to_samples() {
        assert_eq!(sample_count(1.0, 44100.0), 44100);
        assert_eq!(sample_count(0.25, 44100.0), 11025);
        assert_eq!(sample_count(0.0001, 8000.0), 1);
        assert_eq!(sample_count(0.0, 8000.0), 0);
    }

    #[test]
    fn mixing_overlaps_additively() {
        let mut buffer = AudioBuffer::new(4);
        buffer.mix_at(0, &[1.0, 1.0]);
        buffer.mix_at(1, &[0.5, 0.5]);
        assert_eq!(buffer.samples(), &[1.0, 1.5, 0.5, 0.0]);
    }

    #[test]
    fn mixing_clamps_to_the_buffer_end() {
        let mut buffer = AudioBuffer::new(3);
        buffer.mix_at(2, &[1.0, 2.0, 3.0]);
        buffer.mix_at(7, &[4.0]);
        assert_eq!(buffer.samples(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn peak_is_the_largest_magnitude() {
        let buffer = AudioBuffer::from_samples(vec![0.25, -0.75, 0.5]);
        assert_eq!(buffer.peak(), 0.75);
        assert_eq!(AudioBuffer::new(8).peak(), 0.0);
        assert_eq!(AudioBuffer::new(0).peak(), 0.0);
    }

    #[test]
    fn scaling() {
        let mut buffer = AudioBuffer::from_samples(vec![0.5, -1.0]);
        buffer.scale(0.5);
        assert_eq!(buffer.samples(), &[0.25, -0.5]);
        buffer.fill_zero();
        assert_eq!(buffer.samples(), &[0.0, 0.0]);
    }
}
