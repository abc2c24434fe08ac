/// Declares a [`ContainerType`](crate::ContainerType) descriptor from
/// field declarations, keeping the declared order.
///
/// ```
/// use ssz_schema::{ssz_container, SszType};
///
/// let block = ssz_container!(Block {
///     slot: SszType::uint64(),
///     proposer: SszType::uint64(),
///     graffiti: SszType::byte_vector(32)?,
/// })?;
/// # Ok::<(), ssz_schema::Error>(())
/// ```
#[macro_export]
macro_rules! ssz_container {
    ($name:ident { $($field:ident : $ty:expr),* $(,)? }) => {
        $crate::SszType::container(
            stringify!($name),
            vec![$($crate::Field::new(stringify!($field), $ty)),*],
        )
    };
}
