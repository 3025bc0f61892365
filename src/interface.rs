//! Interface identity and type-erased interface views.
//!
//! An interface is an object-safe trait a plugin instance may implement. Because
//! the host and the plugin are compiled independently, interfaces are identified
//! by a canonical fully-qualified *name string*, never by an in-memory type
//! representation: two modules that agree on the name and the trait's contract
//! produce identical identifiers, which is what lets an instance built in one
//! compiled unit be queried from another.

use std::any::Any ;
use std::ptr::NonNull ;



/// Canonical, cross-module-stable identity for an interface trait object.
///
/// Implemented for `dyn Trait` types via the [`interface!`]( crate::interface )
/// macro. The canonical name must be agreed on by every module that refers to
/// the interface; by convention it is the fully-qualified trait path.
///
/// ```
/// use dyn_link::interface ;
///
/// trait Greeter { fn greet( &self ) -> String ; }
/// interface!( dyn Greeter, "example::Greeter" );
/// ```
pub trait Interface: 'static {
	/// Canonical fully-qualified name, stable across independently compiled binaries.
	const CANONICAL_NAME: &'static str ;
}

/// Implements [`Interface`] for a trait object, assigning its canonical name.
///
/// The name should be the fully-qualified trait path so that independently
/// compiled modules agree on it. Declare this next to the trait itself, in the
/// crate both host and plugins share.
///
/// ```
/// use dyn_link::{ interface, Interface };
///
/// trait Volume { fn db( &self ) -> f64 ; }
/// interface!( dyn Volume, "audio::Volume" );
///
/// assert_eq!( <dyn Volume as Interface>::CANONICAL_NAME, "audio::Volume" );
/// ```
#[macro_export]
macro_rules! interface {
	( $object:ty, $name:literal ) => {
		impl $crate::Interface for $object {
			const CANONICAL_NAME: &'static str = $name ;
		}
	};
}

/// Type-erased view storage: a boxed [`InterfaceView`] behind `dyn Any`, ready
/// to be keyed by canonical name and recovered by downcast.
pub(crate) type ErasedView = Box<dyn Any + Send + Sync> ;

/// A view into one interface of an owned plugin instance.
///
/// The pointer targets the interface object *inside* the heap allocation owned
/// by the [`Plugin`]( crate::Plugin ) handle that holds this view. The handle
/// only ever exposes the view reborrowed against its own lifetime, so the
/// pointer cannot be observed dangling.
pub(crate) struct InterfaceView<I: ?Sized> {
	object: NonNull<I>,
}

// SAFETY: the view only ever hands out shared references, and the instance it
// points into is constrained to `Any + Send + Sync` at registration time.
unsafe impl<I: ?Sized> Send for InterfaceView<I> {}
unsafe impl<I: ?Sized> Sync for InterfaceView<I> {}

impl<I: Interface + ?Sized> InterfaceView<I> {

	/// Captures a view over `object`, erasing its borrow.
	///
	/// The caller must guarantee the referent outlives every access through
	/// [`InterfaceView::get`]. Both call sites (interface map construction and
	/// specialized slot construction) point into an instance owned by the same
	/// handle the view is stored in.
	pub(crate) fn of( object: &I ) -> Self {
		Self { object: NonNull::from( object ) }
	}

	/// Captures a view over `object` and boxes it for name-keyed storage.
	pub(crate) fn erased( object: &I ) -> ErasedView {
		Box::new( Self::of( object ))
	}

	/// Reborrows the viewed interface object.
	///
	/// # Safety
	/// The instance the view was captured from must still be alive and must not
	/// have moved. Holds whenever the view is stored alongside the boxed
	/// instance it points into.
	pub(crate) unsafe fn get( &self ) -> &I {
		unsafe { self.object.as_ref() }
	}

	/// Reinterprets the view as targeting interface `T`.
	///
	/// # Safety
	/// `T` and `I` must be the same type. Callers guard this with a `TypeId`
	/// equality check, which the type system cannot see through.
	pub(crate) unsafe fn cast<T: Interface + ?Sized>( &self ) -> &InterfaceView<T> {
		debug_assert_eq!(
			std::any::TypeId::of::<I>(),
			std::any::TypeId::of::<T>(),
			"interface view cast between distinct types",
		);
		// Plain `as` casts cannot convert between the two generic fat pointer
		// types, and transmute cannot prove their sizes equal; T == I per the
		// caller's TypeId guard, so reinterpreting the wrapper is sound.
		unsafe { &*( self as *const InterfaceView<I> ).cast::<InterfaceView<T>>() }
	}

}
