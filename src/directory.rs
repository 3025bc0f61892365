//! Search-path resolution for plugin libraries.
//!
//! Translates a platform-neutral library base name (e.g., `"dummy_plugin"`)
//! into an on-disk path by probing an ordered list of search directories with
//! the host platform's file-naming convention applied (`libdummy_plugin.so`,
//! `libdummy_plugin.dylib`, `dummy_plugin.dll`). Consumed once per
//! [`Library::load`]( crate::Library::load ) call; resolution failure surfaces
//! as an empty result, never an error.

use std::path::PathBuf ;

use itertools::Itertools ;
use log::debug ;
use pipe_trait::Pipe ;



/// Environment variable naming additional search roots, separated by the
/// platform's path-list separator (`:` on Unix, `;` on Windows).
pub const LIBRARY_PATH_ENV: &str = "DYN_LINK_LIBRARY_PATH" ;

/// An ordered list of directories to resolve library base names against.
///
/// Directories added explicitly take precedence over those taken from the
/// [`LIBRARY_PATH_ENV`] environment variable. The first match wins.
///
/// ```
/// use dyn_link::LibraryDirectory ;
///
/// let mut directory = LibraryDirectory::new();
/// directory.add_search_path( "/opt/my-app/plugins" );
///
/// // No such library anywhere on the path: empty result, not an error.
/// assert_eq!( directory.find_library( "does_not_exist" ), None );
/// ```
#[derive( Debug, Clone, Default )]
pub struct LibraryDirectory {
	search_paths: Vec<PathBuf>,
}

impl LibraryDirectory {

	/// Creates a directory seeded from [`LIBRARY_PATH_ENV`], if set.
	pub fn new() -> Self {
		Self {
			search_paths: std::env::var_os( LIBRARY_PATH_ENV )
				.map(| roots | std::env::split_paths( &roots ).collect() )
				.unwrap_or_default(),
		}
	}

	/// Creates a directory with no search paths at all, ignoring the
	/// environment.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Prepends a directory to the search list. Added paths are probed before
	/// environment-provided ones and before paths added earlier.
	pub fn add_search_path( &mut self, path: impl Into<PathBuf> ) {
		self.search_paths.insert( 0, path.into() );
	}

	/// The current search list, highest precedence first.
	#[inline] pub fn search_paths( &self ) -> &[PathBuf] { &self.search_paths }

	/// Decorates a library base name with the platform's prefix and suffix
	/// (e.g., `"dummy"` becomes `libdummy.so` on Linux, `dummy.dll` on Windows).
	pub fn platform_file_name( name: &str ) -> String {
		format!( "{}{}{}", std::env::consts::DLL_PREFIX, name, std::env::consts::DLL_SUFFIX )
	}

	/// Resolves `name` to the first matching file on the search path, or `None`
	/// if no directory contains it.
	///
	/// The decorated platform name is probed first; the name is also probed
	/// verbatim so callers holding a full file name still resolve.
	pub fn find_library( &self, name: &str ) -> Option<PathBuf> {
		let candidates = [ Self::platform_file_name( name ), name.to_string() ];
		self.search_paths.iter()
			.unique()
			.cartesian_product( candidates.iter() )
			.map(|( root, candidate )| root.join( candidate ))
			.find(| path | path.is_file() )
			.pipe(| resolved | {
				match &resolved {
					Some( path ) => debug!( "resolved library {} to {}", name, path.display() ),
					None => debug!( "library {} not found on {} search paths", name, self.search_paths.len() ),
				}
				resolved
			})
	}

}

impl<P: Into<PathBuf>> FromIterator<P> for LibraryDirectory {
	fn from_iter<T: IntoIterator<Item = P>>( paths: T ) -> Self {
		Self { search_paths: paths.into_iter().map( Into::into ).collect() }
	}
}



#[cfg( test )]
mod tests {

	use std::path::Path ;

	use super::* ;

	#[test]
	fn platform_file_name_is_decorated() {
		let name = LibraryDirectory::platform_file_name( "dummy" );
		assert!( name.contains( "dummy" ));
		assert_eq!( name, format!( "{}dummy{}", std::env::consts::DLL_PREFIX, std::env::consts::DLL_SUFFIX ));
	}

	#[test]
	fn explicit_paths_take_precedence() {
		let mut directory = LibraryDirectory::from_iter([ "/first", "/second" ]);
		directory.add_search_path( "/override" );
		assert_eq!( directory.search_paths()[ 0 ], Path::new( "/override" ));
	}

	#[test]
	fn missing_library_is_an_empty_result() {
		let directory = LibraryDirectory::from_iter([ std::env::temp_dir() ]);
		assert_eq!( directory.find_library( "dyn_link_no_such_library" ), None );
	}

}
