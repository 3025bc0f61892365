//! Library loading and the shared-ownership library handle.
//!
//! [`Library::load`] maps a dynamic library into the process, performs the ABI
//! handshake, and invokes the registration entry point exactly once to obtain
//! the library's complete [`PluginRegistry`]. The resulting handle is
//! reference-counted: the OS mapping stays resident while any handle clone or
//! any [`Plugin`]( crate::Plugin ) instantiated from it is alive, so code and
//! vtables referenced by instances can never be unmapped out from under them.

use std::path::{ Path, PathBuf };
use std::sync::Arc ;

use log::debug ;
use pipe_trait::Pipe ;
use thiserror::Error ;

use crate::plugin::{ InstantiationError, Plugin };
use crate::registry::{
	AbiEntryPoint, PluginRegistry, RegistryEntryPoint,
	ABI_SYMBOL, ABI_VERSION, REGISTRY_SYMBOL,
};



/// Errors that can occur while loading a plugin library.
///
/// Loading is synchronous and all-or-nothing: on error, nothing stays mapped
/// and no engine-side state is left behind, so callers may retry freely after
/// fixing the cause.
#[derive( Error, Debug )]
pub enum LoadError {
	/// The path does not resolve to a loadable module.
	#[error( "Library Not Found: {}", .0.display() )] LibraryNotFound( PathBuf ),
	/// The module exists but could not be loaded, or lacks the registration
	/// entry point.
	#[error( "Library Load Error: {}: {}", path.display(), reason )] LibraryLoadError { path: PathBuf, reason: LoadFailure },
}

/// The specific cause behind [`LoadError::LibraryLoadError`].
#[derive( Error, Debug )]
pub enum LoadFailure {
	/// The dynamic linker rejected the module.
	#[error( "{0}" )] Open( #[from] libloading::Error ),
	/// A required entry point symbol is not exported.
	#[error( "registration entry point `{0}` is missing" )] MissingEntryPoint( &'static str ),
	/// The library was built against an incompatible version of this crate.
	#[error( "plugin reports ABI {found}, host expects {expected}" )] AbiMismatch { expected: u64, found: u64 },
}

/// A handle to a loaded plugin library and the registry it exports.
///
/// `Library` is a handle type: cloning it creates another reference to the
/// same loaded module rather than loading it again. The underlying module is
/// released only once every handle clone *and* every [`Plugin`] instantiated
/// from it has been dropped; teardown order is thereby an ownership fact, not
/// a caller obligation.
///
/// Loading the same path twice through separate [`Library::load`] calls is
/// permitted and yields independent handles; no caching is performed.
#[derive( Clone )]
pub struct Library {
	inner: Arc<LibraryInner>,
}

pub(crate) struct LibraryInner {
	/// Dropped before `module`: factories and attach closures in the registry
	/// are code residing in the loaded library.
	registry: PluginRegistry,
	/// The OS-level mapping. `None` for in-process registries.
	module: Option<libloading::Library>,
	/// Origin path, for diagnostics. `None` for in-process registries.
	path: Option<PathBuf>,
}

impl Library {

	/// Loads the dynamic library at `path` and collects its plugin registry.
	///
	/// The registration entry point runs immediately; a library that registers
	/// zero plugin classes is a successful (if useless) load, not an error.
	///
	/// # Errors
	/// [`LoadError::LibraryNotFound`] if `path` is not a loadable module on
	/// disk; [`LoadError::LibraryLoadError`] if the module loads but fails the
	/// ABI handshake or lacks the registration entry point.
	pub fn load( path: impl AsRef<Path> ) -> Result<Self, LoadError> {

		let path = path.as_ref();
		if !path.is_file() {
			return Err( LoadError::LibraryNotFound( path.to_path_buf() ));
		}

		let fail = | reason: LoadFailure | LoadError::LibraryLoadError { path: path.to_path_buf(), reason };

		// SAFETY: mapping a library executes its initialisers. That is the
		// deal callers sign up for when loading plugin code; no soundness
		// guarantee can be made about a hostile module.
		let module = unsafe { libloading::Library::new( path ) }
			.map_err(| error | fail( error.into() ))?;

		let registry = {
			let abi = unsafe { module.get::<AbiEntryPoint>( ABI_SYMBOL.as_bytes() ) }
				.map_err(| _ | fail( LoadFailure::MissingEntryPoint( ABI_SYMBOL )))?;
			// SAFETY: symbol signature is fixed by the export_registry! macro.
			let found = unsafe { abi() };
			if found != ABI_VERSION {
				return Err( fail( LoadFailure::AbiMismatch { expected: ABI_VERSION, found }));
			}

			let entry = unsafe { module.get::<RegistryEntryPoint>( REGISTRY_SYMBOL.as_bytes() ) }
				.map_err(| _ | fail( LoadFailure::MissingEntryPoint( REGISTRY_SYMBOL )))?;
			// SAFETY: the entry point hands over a Box created by the plugin's
			// copy of this crate; the ABI handshake above vouches for layout
			// agreement. Reclaimed exactly once.
			unsafe { Box::from_raw( entry() ) }.pipe(| boxed | *boxed )
		};

		debug!(
			"loaded library {} exporting {} plugin classes",
			path.display(), registry.len(),
		);

		Ok( Self { inner: Arc::new( LibraryInner {
			registry,
			module: Some( module ),
			path: Some( path.to_path_buf() ),
		})})

	}

	/// Wraps an in-process registry in a library handle with no OS module
	/// behind it.
	///
	/// Useful for statically linked plugins and for tests: from instantiation
	/// onward the handle behaves identically to a loaded one.
	pub fn from_registry( registry: PluginRegistry ) -> Self {
		Self { inner: Arc::new( LibraryInner {
			registry,
			module: None,
			path: None,
		})}
	}

	/// Instantiates the plugin class named `class_name` (exact string match).
	///
	/// Each call invokes the class factory afresh and builds the instance's
	/// interface map once; the returned [`Plugin`] keeps this library alive.
	///
	/// # Errors
	/// [`InstantiationError::PluginClassNotFound`] if the registry has no such
	/// class. The handle remains valid and reusable for other class names.
	pub fn instantiate( &self, class_name: &str ) -> Result<Plugin, InstantiationError> {
		match self.inner.registry.get( class_name ) {
			Some( registration ) => Ok( Plugin::build( registration, Arc::clone( &self.inner ))),
			None => Err( InstantiationError::PluginClassNotFound {
				class: class_name.to_string(),
				available: self.inner.registry.class_names().join( ", " ),
			}),
		}
	}

	/// The registry this library exports.
	#[inline] pub fn registry( &self ) -> &PluginRegistry { &self.inner.registry }

	/// The path the library was loaded from, if it came from disk.
	#[inline] pub fn path( &self ) -> Option<&Path> { self.inner.path.as_deref() }

}

impl std::fmt::Debug for Library {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Library" )
			.field( "path", &self.inner.path )
			.field( "classes", &self.inner.registry.class_names() )
			.field( "module", &self.inner.module.as_ref().map(| _ | "<loaded>" ))
			.finish()
	}
}
