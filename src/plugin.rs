//! The type-erased plugin instance handle.
//!
//! A [`Plugin`] exclusively owns one instantiated plugin object plus its
//! interface map: canonical interface name to type-erased view, populated once
//! at instantiation from the class's registration record and immutable
//! afterward. Interface absence is a defined empty result at this layer, never
//! an error; only a caller that *requires* an interface turns its absence into
//! a failure.

use std::any::Any ;
use std::collections::HashMap ;
use std::sync::Arc ;

use itertools::Itertools ;
use thiserror::Error ;

use crate::interface::{ ErasedView, Interface, InterfaceView };
use crate::library::LibraryInner ;
use crate::registry::{ OpaqueInstance, PluginRegistration };
use crate::specialization::{ SpecList, Specialized };



/// Errors that can occur when instantiating a plugin class.
#[derive( Error, Debug )]
pub enum InstantiationError {
	/// The requested class name is absent from the library's registry.
	/// No instance is produced and the library handle stays valid.
	#[error( "Plugin Class Not Found: {class} (available: {available})" )] PluginClassNotFound { class: String, available: String },
}

/// An instantiated plugin, owning its opaque instance and interface map.
///
/// Created by [`Library::instantiate`]( crate::Library::instantiate ). Keeps
/// the originating library mapped for as long as it lives. Interface lookups
/// all alias the single owned instance; no lookup ever copies or
/// re-instantiates.
///
/// Lookup cost is proportional to the interface map (amortized `O(1)` over the
/// handful of interfaces a class implements). Callers that know their
/// interfaces at compile time can shortcut the map entirely through
/// [`Plugin::specialized`].
pub struct Plugin {
	// Field order is load-bearing for teardown: views point into `instance`,
	// and the drop glue of both lives in code owned by `library`.
	views: HashMap<&'static str, ErasedView>,
	// The single source of truth every view aliases. Only read through views.
	#[allow( dead_code )]
	instance: OpaqueInstance,
	class_name: String,
	// Held purely to keep the module mapped.
	#[allow( dead_code )]
	library: Arc<LibraryInner>,
}

impl Plugin {

	pub(crate) fn build( registration: &PluginRegistration, library: Arc<LibraryInner> ) -> Self {
		let instance = registration.instantiate();
		Self {
			views: registration.attach_views( instance.as_ref() ),
			instance,
			class_name: registration.class_name().to_string(),
			library,
		}
	}

	/// Retrieves the instance's view of interface `I`, or `None` if the class
	/// does not implement it.
	///
	/// This is the generic path: `I`'s canonical name is looked up in the
	/// interface map. Repeated calls return references aliasing the same
	/// underlying state.
	pub fn interface<I: Interface + ?Sized>( &self ) -> Option<&I> {
		self.interface_by_name( I::CANONICAL_NAME )?
			.downcast_ref::<InterfaceView<I>>()
			// SAFETY: the view targets `self.instance`, owned by this handle
			// and alive for at least the returned borrow.
			.map(| view | unsafe { view.get() })
	}

	/// Retrieves the type-erased view registered under `interface_name`, for
	/// callers that only know the interface name at runtime.
	///
	/// Agrees exactly with [`Plugin::interface`]: the typed path is this
	/// lookup followed by a downcast of the returned view.
	pub fn interface_by_name( &self, interface_name: &str ) -> Option<&( dyn Any + Send + Sync )> {
		self.views.get( interface_name ).map( Box::as_ref )
	}

	/// Whether the instance implements interface `I`.
	pub fn implements<I: Interface + ?Sized>( &self ) -> bool {
		self.implements_name( I::CANONICAL_NAME )
	}

	/// Whether the instance implements the interface registered under
	/// `interface_name`.
	pub fn implements_name( &self, interface_name: &str ) -> bool {
		self.views.contains_key( interface_name )
	}

	/// Canonical names of every interface this instance implements, sorted.
	pub fn interface_names( &self ) -> Vec<&'static str> {
		self.views.keys().copied().sorted().collect()
	}

	/// The class name this instance was created from.
	#[inline] pub fn class_name( &self ) -> &str { &self.class_name }

	/// Wraps this handle in a [`Specialized`] view promising zero-lookup
	/// access to the interfaces listed in `L`.
	///
	/// ```
	/// # use dyn_link::{ interface, spec_list, Library, PluginRegistry, PluginRegistration };
	/// # trait Beep { fn beep( &self ) -> u8 ; }
	/// # interface!( dyn Beep, "demo::Beep" );
	/// # #[derive( Default )] struct BeepPlugin ;
	/// # impl Beep for BeepPlugin { fn beep( &self ) -> u8 { 7 } }
	/// # let library = Library::from_registry( PluginRegistry::from_iter([
	/// # 	PluginRegistration::of( "demo::BeepPlugin", BeepPlugin::default )
	/// # 		.implements::<dyn Beep>(| plugin | plugin ).finish(),
	/// # ]));
	/// let plugin = library.instantiate( "demo::BeepPlugin" )?;
	/// let view = plugin.specialized::<spec_list![ dyn Beep ]>();
	/// assert_eq!( view.interface::<dyn Beep>().map(| beep | beep.beep() ), Some( 7 ));
	/// # Ok::<(), dyn_link::InstantiationError>(())
	/// ```
	pub fn specialized<L: SpecList>( &self ) -> Specialized<'_, L> {
		Specialized::new( self )
	}

}

impl std::fmt::Debug for Plugin {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Plugin" )
			.field( "class_name", &self.class_name )
			.field( "interfaces", &self.interface_names() )
			.finish_non_exhaustive()
	}
}
