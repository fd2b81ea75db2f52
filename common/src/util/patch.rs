//! Merging of partial updates: absent fields keep the stored value.

/// Overwrites `target` when a value is present.
pub fn set_if_some<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Same as [`set_if_some`] for optional entity fields.
pub fn set_opt_if_some<T>(target: &mut Option<T>, value: Option<T>) {
    if let Some(value) = value {
        *target = Some(value);
    }
}

/// `merge_fields!(entity, patch; a, b, c)` copies every present `patch.x` into `entity.x`.
///
/// Required entity fields use `merge_fields!`, optional ones `merge_opt_fields!`.
#[macro_export]
macro_rules! merge_fields {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $( $crate::util::patch::set_if_some(&mut $target.$field, $patch.$field.clone()); )+
    };
}

#[macro_export]
macro_rules! merge_opt_fields {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $( $crate::util::patch::set_opt_if_some(&mut $target.$field, $patch.$field.clone()); )+
    };
}
