use std::fs ;

use dyn_link::{ LibraryDirectory, LIBRARY_PATH_ENV };

// The only test in the suite touching process environment. Keep it that way:
// `set_var` races with concurrent reads from other threads.
#[test]
fn environment_roots_are_searched() {

	let root = std::env::temp_dir().join( format!( "dyn-link-env-roots-{}", std::process::id() ));
	fs::create_dir_all( &root ).unwrap();
	let planted = root.join( LibraryDirectory::platform_file_name( "env_seeded" ));
	fs::write( &planted, b"found through the environment" ).unwrap();

	std::env::set_var( LIBRARY_PATH_ENV, &root );
	let directory = LibraryDirectory::new();
	std::env::remove_var( LIBRARY_PATH_ENV );

	assert_eq!( directory.search_paths(), [ root.clone() ]);
	assert_eq!( directory.find_library( "env_seeded" ), Some( planted ));
	fs::remove_dir_all( &root ).unwrap();

}
