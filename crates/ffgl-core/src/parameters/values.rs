use super::ParamInfo;
use crate::{FFGLError, FFGLResult};

/// Current values of an instance's parameters, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamValues<const N: usize> {
    values: [f32; N],
}

impl<const N: usize> ParamValues<N> {
    /// Seed every slot with its declared default.
    pub fn from_defaults(table: &[&dyn ParamInfo; N]) -> Self {
        ParamValues {
            values: std::array::from_fn(|i| table[i].default_val()),
        }
    }

    pub fn get(&self, index: usize) -> FFGLResult<f32> {
        self.values
            .get(index)
            .copied()
            .ok_or(FFGLError::ParamOutOfRange { index, count: N })
    }

    /// Store `value` clamped into the parameter's declared range.
    pub fn set(&mut self, table: &[&dyn ParamInfo; N], index: usize, value: f32) -> FFGLResult<f32> {
        let slot = self
            .values
            .get_mut(index)
            .ok_or(FFGLError::ParamOutOfRange { index, count: N })?;
        *slot = table[index].clamp(value);
        Ok(*slot)
    }

    pub fn as_array(&self) -> &[f32; N] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::SimpleParamInfo;

    static A: SimpleParamInfo = SimpleParamInfo::standard(c"A", 0.25);
    static B: SimpleParamInfo = SimpleParamInfo::standard(c"B", 0.75);
    static TABLE: [&dyn ParamInfo; 2] = [&A, &B];

    #[test]
    fn starts_at_defaults() {
        let values = ParamValues::from_defaults(&TABLE);
        assert_eq!(values.as_array(), &[0.25, 0.75]);
    }

    #[test]
    fn set_clamps_and_reports_stored_value() {
        let mut values = ParamValues::from_defaults(&TABLE);
        assert_eq!(values.set(&TABLE, 1, 3.0).unwrap(), 1.0);
        assert_eq!(values.get(1).unwrap(), 1.0);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut values = ParamValues::from_defaults(&TABLE);
        assert!(matches!(
            values.get(2),
            Err(FFGLError::ParamOutOfRange { index: 2, count: 2 })
        ));
        assert!(values.set(&TABLE, 9, 0.5).is_err());
        assert_eq!(values.as_array(), &[0.25, 0.75]);
    }
}
